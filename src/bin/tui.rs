use anyhow::Result;

fn main() -> Result<()> {
    smartshopper::tui::run()
}
