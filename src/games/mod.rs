pub mod whack;
