pub mod accuweather;
