pub mod donation;
pub mod donor;
pub mod expense;
pub mod member;

pub use donation::Donation;
pub use donor::Donor;
pub use expense::Expense;
pub use member::Member;
