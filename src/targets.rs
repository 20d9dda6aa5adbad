use crate::error::TargetError;
use ipnet::IpNet;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Largest IPv6 block `expand_cidr` will enumerate. IPv4 blocks are never refused.
pub const MAX_EXPANDED_V6_HOSTS: u128 = 1 << 16;

/// Expand a comma-separated target list into individual hosts.
///
/// Items containing `/` are expanded as CIDR blocks; anything else (an IP
/// literal or a hostname) is kept as-is.
pub fn parse_targets(spec: &str) -> Result<Vec<String>, TargetError> {
    let mut out = Vec::new();
    for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if item.contains('/') {
            out.extend(expand_cidr(item)?);
        } else {
            out.push(item.to_string());
        }
    }
    if out.is_empty() {
        return Err(TargetError::Empty);
    }
    Ok(out)
}

/// Expand a CIDR literal into every address of the block, ascending.
///
/// Blocks with more than two addresses skip the network and broadcast
/// addresses; /31, /32 (and IPv6 /127, /128) return everything.
pub fn expand_cidr(cidr: &str) -> Result<Vec<String>, TargetError> {
    let net: IpNet = cidr.trim().parse()?;
    expand_net(net).map(|ips| ips.into_iter().map(|ip| ip.to_string()).collect())
}

/// Same as [`expand_cidr`] on an already parsed network.
pub fn expand_net(net: IpNet) -> Result<Vec<IpAddr>, TargetError> {
    let ips = match net {
        IpNet::V4(n4) => {
            let base = u64::from(u32::from(n4.network()));
            let count = 1u64 << (32 - u32::from(n4.prefix_len()));
            let (first, last) = host_offsets(count);
            (first..last)
                .map(|off| IpAddr::V4(Ipv4Addr::from((base + off) as u32)))
                .collect()
        }
        IpNet::V6(n6) => {
            let host_bits = 128 - u32::from(n6.prefix_len());
            let count = 1u128
                .checked_shl(host_bits)
                .filter(|&c| c <= MAX_EXPANDED_V6_HOSTS)
                .ok_or_else(|| TargetError::TooLarge {
                    cidr: net.to_string(),
                    count: 1u128.checked_shl(host_bits).unwrap_or(u128::MAX),
                    limit: MAX_EXPANDED_V6_HOSTS,
                })?;
            let base = u128::from(n6.network());
            let (first, last) = host_offsets(count as u64);
            (first..last)
                .map(|off| IpAddr::V6(Ipv6Addr::from(base + u128::from(off))))
                .collect()
        }
    };
    Ok(ips)
}

// Offsets to enumerate: network and broadcast are skipped once a block has more than two addresses.
fn host_offsets(count: u64) -> (u64, u64) {
    if count > 2 {
        (1, count - 1)
    } else {
        (0, count)
    }
}
