mod allocator;

pub use allocator::{allocate, ceil_tenth, price, Allocation, PROVIDER_ALLOWANCE};
