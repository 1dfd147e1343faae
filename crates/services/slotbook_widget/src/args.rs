pub const USAGE: &str = "\
Usage: slotbook-widget <page-url> [options]

Mounts the booking flow for <page-url> (e.g. 'https://site/book?psyId=123&mock=1')
and prints the rendered view as JSON.

Options:
  --select <n>        Select the n-th listed slot (1-based) and book it
  --name <name>       Contact name
  --email <email>     Contact email
  --telegram <tag>    Telegram handle or phone
  --agree             Accept the offer terms
  --open-agreement    Open the offer terms through the host
  --close             Close the widget when done
  -h, --help          Show this help";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub page_url: String,
    pub select: Option<usize>,
    pub name: String,
    pub email: String,
    pub telegram: String,
    pub agree: bool,
    pub open_agreement: bool,
    pub close: bool,
    pub help: bool,
}

pub fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = Args::default();
    let mut page_url = None;
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "--agree" => parsed.agree = true,
            "--open-agreement" => parsed.open_agreement = true,
            "--close" => parsed.close = true,
            "--select" => {
                let value = iter.next().ok_or("--select needs a slot number")?;
                let index = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("Invalid slot number: {value}"))?;
                parsed.select = Some(index);
            }
            "--name" => parsed.name = iter.next().ok_or("--name needs a value")?,
            "--email" => parsed.email = iter.next().ok_or("--email needs a value")?,
            "--telegram" => parsed.telegram = iter.next().ok_or("--telegram needs a value")?,
            flag if flag.starts_with("--") => return Err(format!("Unknown option: {flag}")),
            _ if page_url.is_none() => page_url = Some(arg.clone()),
            _ => return Err(format!("Unexpected argument: {arg}")),
        }
    }

    if !parsed.help {
        parsed.page_url = page_url.ok_or("Missing page URL")?;
    }
    Ok(parsed)
}
