mod command;
mod history;
mod schema;
mod util;

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    command::run()
}
