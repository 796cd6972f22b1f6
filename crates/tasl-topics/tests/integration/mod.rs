mod lifecycle;
mod listing;
