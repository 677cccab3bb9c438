//! Desktop client entrypoint.

fn main() -> anyhow::Result<()> {
    userdeck::run().map_err(|err| anyhow::anyhow!("native app error: {}", err))
}
