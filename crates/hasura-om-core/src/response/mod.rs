mod flatten_instruction;
mod flattener;
mod settings;

pub use flatten_instruction::FlattenInstruction;
pub use flattener::flatten;
pub use settings::Settings;
pub use settings::SettingsOverride;

#[cfg(test)]
mod tests;
