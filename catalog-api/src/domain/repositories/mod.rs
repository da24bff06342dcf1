pub mod in_memory;
pub mod items_repository;
pub mod mongo;

pub use in_memory::InMemItemsRepository;
pub use items_repository::ItemsRepository;
#[cfg(test)]
pub use items_repository::MockItemsRepository;
pub use mongo::MongoDbItemsRepository;
