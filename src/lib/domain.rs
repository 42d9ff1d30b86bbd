//! Domain types and collaborator traits

pub mod communication;
