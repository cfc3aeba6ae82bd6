/// Side effects that UI components ask the runtime to perform.
///
/// Components never mutate the form directly for these; the runtime applies
/// them in order so there is a single writer per interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Validate the draft and append it on success.
    SubmitDraft,
    /// Empty the draft and dismiss any error.
    ClearDraft,
    /// Remove the student at the given roster position.
    RemoveStudent(usize),
    /// Step the grade selector.
    CycleGrade { forward: bool },
    Quit,
}

/// Application-level messages delivered by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// Periodic tick while idle.
    Tick,
    /// Terminal was resized to the given width and height.
    Resize(u16, u16),
}
