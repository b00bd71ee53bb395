/// Panels and inputs around the prompter surface.
#[derive(Debug, Clone, Default)]
pub(in crate::app) struct UiState {
    pub(in crate::app) show_settings: bool,
    pub(in crate::app) fullscreen: bool,
    pub(in crate::app) open_path_input: String,
    pub(in crate::app) status: Option<String>,
}
