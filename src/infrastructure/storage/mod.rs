mod memory;

pub use memory::MemoryKeyValueStore;
