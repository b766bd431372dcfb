use std::process;

fn main() {
    let exit_code = ipcommon::run(std::env::args_os());
    process::exit(exit_code);
}
