pub mod city_list;
pub mod empty_state;
pub mod notification_area;
pub mod search_dialog;
pub mod weather_view;
