mod controls;
mod details;
mod list;
mod panels;
mod status;
