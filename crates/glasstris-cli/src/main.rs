mod app;
mod command;
mod input;
mod score_store;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
