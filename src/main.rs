use std::io::{self, BufRead, Write};

use quadcalc::console::{write_in_color, Color};
use quadcalc::net::Subnet;
use quadcalc::parse::{parse_subnet, parse_subnet_parts};


const LABEL_COLOR: Color = Color::White;
const LABEL_WIDTH: usize = 19;

fn print_labeled(label: &str, value: &str, color: Color) {
    write_in_color(label, Some(LABEL_COLOR), LABEL_WIDTH);
    write_in_color(value, Some(color), 0);
    println!();
}

fn print_report(subnet: &Subnet) {
    println!();
    print_labeled("Network Address:", &subnet.base_addr().to_string(), Color::Cyan);
    print_labeled(
        "Subnet Mask:",
        &format!("{} (/{})", subnet.subnet_mask(), subnet.prefix_len()),
        Color::Red,
    );
    print_labeled("Broadcast Address:", &subnet.broadcast_addr().to_string(), Color::White);
    print_labeled("Number of Hosts:", &subnet.host_count().to_string(), Color::Green);
    print_labeled("First Host IP:", &subnet.first_host_addr().to_string(), Color::White);
    print_labeled("Last Host IP:", &subnet.last_host_addr().to_string(), Color::White);
    print_labeled("Address Class:", &subnet.base_addr().address_class().to_string(), Color::Magenta);

    write_in_color("Subnet ", Some(LABEL_COLOR), 0);
    write_in_color(
        if subnet.is_private_subnet() { "is" } else { "isn't" },
        Some(Color::Yellow),
        0,
    );
    write_in_color(" a private subnet", Some(LABEL_COLOR), 0);
    println!();

    if subnet.base_addr().is_loopback() {
        print_labeled("Note:", "loopback range", Color::Yellow);
    }
    if subnet.base_addr().is_link_local() {
        print_labeled("Note:", "link-local range", Color::Yellow);
    }

    print_labeled("Next Subnet:", &subnet.next_subnet().to_string(), Color::White);
}

fn run() -> i32 {
    println!("Subnet Calculator (version {})", env!("CARGO_PKG_VERSION"));
    println!("----------------------------------------------------------");
    println!("Write 'ex' to exit the program.");
    println!("With this tool, you can calculate IPv4 subnets, the input should look like:");
    println!("[IP] [CIDR] OR [IP]/[CIDR] OR [IP]/[Subnet Mask]");

    let stdin = io::stdin();
    loop {
        print!("\nInput: ");
        if io::stdout().flush().is_err() {
            return 1;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {},
            Err(e) => {
                eprintln!("failed to read input: {}", e);
                return 1;
            },
        }
        let input = line.trim();

        if input.to_lowercase().contains("ex") {
            break;
        }

        // "IP CIDR" is accepted as a convenience when no slash is given
        let result = match input.split_once(' ') {
            Some((addr_spec, subnet_spec)) if !input.contains('/')
                => parse_subnet_parts(addr_spec, subnet_spec),
            _ => parse_subnet(input),
        };

        match result {
            Ok(subnet) => print_report(&subnet),
            Err(e) => eprintln!("{}", e),
        };
    }

    0
}

fn main() {
    std::process::exit(run());
}
