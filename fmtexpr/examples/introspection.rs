use clap::Parser;
use fmtexpr::prelude::*;
use termcolor::ColorChoice;

/// Build a sample pack and print its introspection report
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Line width (defaults to the terminal width)
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Suffix every identity with a short uuid prefix
    #[arg(short, long, default_value_t = false)]
    pub qualified: bool,

    /// Disable colors
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

fn main() {
    let args = Args::parse();

    let int = declare_primitive(Descriptor::field("int", IntegerField::I32));
    let a = declare_variable("a");
    let b = declare_typed_variable("b", &int);
    let c = declare_variable("c");
    let d = declare_typed_variable("d", &int);
    let e = &a + &c;
    let i = 3;

    let pack = pack![
        0,
        int.clone(),
        int.bind(i),
        int.bind(0),
        a.clone(),
        a.bind(1),
        a.clone(),
        a.bind(1),
        b.clone(),
        c.clone(),
        c.bind(i),
        d.clone(),
        d.bind(4),
        e,
    ];

    let mut options = RenderOptions::default();
    if let Some(width) = args.width {
        options = options.with_width(width);
    }
    if args.qualified {
        options = options.with_labels(LabelStyle::Qualified);
    }
    if args.no_color {
        options = options.with_color(ColorChoice::Never);
    }
    pack.pretty_print_with(&options).unwrap();

    match pack.validate() {
        Ok(_) => println!("pack is self-consistent"),
        Err(errors) => {
            for error in &errors {
                eprintln!("{}", error);
            }
        }
    }
}
