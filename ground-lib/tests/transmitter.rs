#![forbid(unsafe_code)]

mod dsm2_scenarios;
mod dsmx_inverse_alias;
mod frskyx_scenario;
mod persistence_round_trip;
