pub mod data_table;
pub mod multi_select;
