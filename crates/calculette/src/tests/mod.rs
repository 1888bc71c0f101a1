mod common;
mod routing;
mod simulation;
