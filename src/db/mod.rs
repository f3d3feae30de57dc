pub mod petpoint;
pub mod prod_db;
