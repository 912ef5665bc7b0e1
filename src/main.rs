fn main() -> anyhow::Result<()> {
    chord_layout::cli::run()
}
