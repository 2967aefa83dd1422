pub mod sqlite_donor_repository;

pub use sqlite_donor_repository::SqliteDonorRepository;
