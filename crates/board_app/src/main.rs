mod app;
mod config;
mod effects;
mod gestures;
mod render;

fn main() -> anyhow::Result<()> {
    app::run_board()
}
