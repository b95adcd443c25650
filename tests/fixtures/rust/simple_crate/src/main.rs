use simple_crate::net::client::Client;

fn main() {
    let client = Client { stream: None };
    println!("{}", client.stream.is_none());
}
