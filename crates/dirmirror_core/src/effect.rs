#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartMirror { source: String, target: String },
    Cancel,
}
