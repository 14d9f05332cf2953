pub mod brewery;
pub mod vote;

pub use brewery::Entity as Brewery;
pub use vote::Entity as Vote;
