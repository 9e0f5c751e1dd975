use garnet::uci;

fn main() {
    uci::run_uci_loop();
}
