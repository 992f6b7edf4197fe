pub mod ops_publish;
pub mod ops_upgrade;
