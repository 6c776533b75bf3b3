use clap::Parser as ClapParser;
use log::debug;
use miette::{IntoDiagnostic, Result, bail};
use svlogic::{FormatSpec, Planes, format_planes, limbs_for, natural_width, parse_planes};

#[derive(ClapParser)]
#[command(name = "svlit", about = "Parse SystemVerilog literals and print them in other bases")]
struct Cli {
    /// Literals such as `8'hff`, `4'b10xz` or `'1`
    #[arg(required = true)]
    literals: Vec<String>,

    /// Width of the target variable in bits
    #[arg(long, short, default_value_t = 32)]
    width: usize,

    /// Treat the target variable as signed
    #[arg(long, short)]
    signed: bool,

    /// Output format `<width><base>`; may be repeated
    #[arg(long, short, default_values_t = ["b".to_string()])]
    format: Vec<String>,

    /// Reject invalid digits instead of skipping them
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.width == 0 {
        bail!("width must be at least 1");
    }
    let specs = cli
        .format
        .iter()
        .map(|spec| spec.parse::<FormatSpec>().into_diagnostic())
        .collect::<Result<Vec<_>>>()?;

    let limbs = limbs_for(cli.width);
    let mut value = vec![0u64; limbs];
    let mut mask = vec![0u64; limbs];
    for literal in &cli.literals {
        parse_planes(literal, cli.width, &mut value, &mut mask, cli.strict).into_diagnostic()?;
        let planes = Planes::four_state(cli.width, &value, &mask);
        debug!(
            "`{literal}`: {} limbs, unknown bits: {}",
            limbs,
            planes.has_unknown()
        );

        let columns = specs
            .iter()
            .map(|spec| {
                let text = format_planes(*spec, planes, cli.signed);
                debug!(
                    "{:?} natural width {}",
                    spec.radix,
                    natural_width(spec.radix, cli.width)
                );
                text
            })
            .collect::<Vec<_>>();
        println!("{literal}\t{}", columns.join("\t"));
    }
    Ok(())
}
