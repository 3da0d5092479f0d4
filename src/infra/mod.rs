pub mod gsheets;
