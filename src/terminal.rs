use crate::errors::ClientError;
use crate::feed::{
    diff::Patch,
    presenter::Presenter,
    render::{region_html, Page},
};

/// Prints pages to standard output
pub struct TerminalPresenter {
    html: bool,
    pending: Option<String>,
    error_count: usize,
}

impl TerminalPresenter {
    pub fn new(html: bool) -> Self {
        Self { html, pending: None, error_count: 0 }
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Prints the latest rendered page, if any
    pub fn flush(&mut self) -> () {
        if let Some(output) = self.pending.take() {
            println!("{}", output);
        };
    }
}

fn patches_html(patches: &[Patch]) -> String {
    patches.iter()
        .map(|patch| match patch {
            Patch::ShowSection(section) => {
                format!("<!-- show #{} -->", section.element_id())
            },
            Patch::ReplaceRegion { region, elements } => {
                region_html(*region, elements)
            },
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl Presenter for TerminalPresenter {
    fn apply(&mut self, page: &Page, patches: &[Patch]) {
        let output = if self.html {
            // Changed regions accumulate until flush
            let html = patches_html(patches);
            match self.pending.take() {
                Some(pending) => format!("{}\n{}", pending, html),
                None => html,
            }
        } else {
            page.to_text()
        };
        self.pending = Some(output);
    }

    fn alert(&mut self, message: &str) {
        self.flush();
        println!("! {}", message);
    }

    fn report(&mut self, error: &ClientError) {
        self.error_count += 1;
        eprintln!("error: {}", error);
    }
}
