pub mod entities;
pub mod value_objects;

pub use entities::{DEFAULT_PAGE_SIZE, FilterSelection, ListState, Predicate, QueryDescriptor};
pub use value_objects::{
  ListingError, Operator, PaymentFilter, Sort, SortDirection, SortField, StatusFilter,
};
