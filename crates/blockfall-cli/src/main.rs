mod command;
mod model;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
