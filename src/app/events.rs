/// Events feeding the driver loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Input(String),
    Tick,
    Quit,
}
