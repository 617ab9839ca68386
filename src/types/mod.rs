pub mod daily_variable;
pub mod lookup_key;
pub mod observation;
pub mod weather_cache;
