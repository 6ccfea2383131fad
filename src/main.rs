use Genex::Examples::genex_examples::genex_examples;
use Genex::Utils::logger::{init_logger, init_logger_with_file};
use simplelog::LevelFilter;

pub fn main() {
    let task: usize = 1;
    // the configuration file example keeps a log next to its config
    if task == 3 {
        if let Err(e) = init_logger_with_file(LevelFilter::Info, "genex.log") {
            eprintln!("cannot open log file: {}", e);
            init_logger(LevelFilter::Info);
        }
    } else {
        init_logger(LevelFilter::Info);
    }
    genex_examples(task);
}
