// Interface adapters: views handed to collaborators outside the engine.

pub mod protocol;
