pub mod alias;
pub mod reconcile;
pub mod show;
