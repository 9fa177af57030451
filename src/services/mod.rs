/// Media players reached through `playerctl`
pub mod player;
/// External command execution
pub mod process;
