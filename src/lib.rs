pub mod config;
pub mod demo_data;
pub mod elo;
pub mod http_client;
pub mod key_battles;
pub mod model;
pub mod optimizer;
pub mod player_data;
pub mod player_score;
pub mod predictor;
pub mod reference;
pub mod selector;
pub mod teams;
pub mod venue;
pub mod weather;
