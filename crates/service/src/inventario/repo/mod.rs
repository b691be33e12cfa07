pub mod seaorm;

pub use seaorm::SeaOrmInventarioRepository;
