use crate::db::petpoint::animals_archive::AnimalsArchive;

pub struct ProdDb {}

impl ProdDb {
    pub fn petpoint_animals() -> AnimalsArchive {
        AnimalsArchive {
            base_dir: "/home/shelter/Downloads/Archive/PetPoint/Reports".to_string(),
            duckdb_path: "/home/shelter/Downloads/Archive/DuckDB/petpoint/animals.duckdb"
                .to_string(),
        }
    }
}
