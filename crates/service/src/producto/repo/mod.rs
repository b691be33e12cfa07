pub mod seaorm;

pub use seaorm::SeaOrmProductoRepository;
