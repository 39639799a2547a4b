fn main() {
    std::process::exit(durq::app::startup::startup());
}
