pub mod site;
pub mod walker;

pub use walker::CheckoutWalker;
