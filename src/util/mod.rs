pub mod buffered_state;
pub mod seq_lock;
