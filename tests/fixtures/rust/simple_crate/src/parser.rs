use crate::net::Connection;
use std::io::Read;

pub fn parse(conn: &mut Connection) -> String {
    let mut buf = String::new();
    let _ = conn.read_to_string(&mut buf);
    buf
}
