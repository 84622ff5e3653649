pub mod match_members;
