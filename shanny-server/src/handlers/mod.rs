pub mod admin;
pub mod contact;
pub mod health;
pub mod site;
