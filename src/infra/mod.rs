pub mod smartdublin;
