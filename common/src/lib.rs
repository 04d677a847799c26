pub mod macros;

crate::agg_mod![db, models];
