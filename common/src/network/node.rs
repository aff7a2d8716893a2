//! # Discovered Entities
//!
//! What the acceptors are asked about: a [`Node`] seen on one side of a
//! sampled TCP connection, or a listening [`Endpoint`] on a node.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

/// Side of the observed connection the node was on.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Role {
    Client,
    Server,
}

/// A discovered address whose role may not be known yet.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Node {
    pub address: IpAddr,
    pub role: Option<Role>,
}

impl Node {
    pub fn new(address: IpAddr) -> Self {
        Self {
            address,
            role: None,
        }
    }

    pub fn client(address: IpAddr) -> Self {
        Self::new(address).with_role(Role::Client)
    }

    pub fn server(address: IpAddr) -> Self {
        Self::new(address).with_role(Role::Server)
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn is_client(&self) -> bool {
        self.role == Some(Role::Client)
    }

    pub fn is_server(&self) -> bool {
        self.role == Some(Role::Server)
    }
}

impl From<Ipv4Addr> for Node {
    fn from(addr: Ipv4Addr) -> Self {
        Self::new(IpAddr::V4(addr))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Some(Role::Client) => write!(f, "{} (client)", self.address),
            Some(Role::Server) => write!(f, "{} (server)", self.address),
            None => write!(f, "{}", self.address),
        }
    }
}

/// A port exposed by a node.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Endpoint {
    pub node: Node,
    pub port: u16,
}

impl Endpoint {
    pub fn new(node: Node, port: u16) -> Self {
        Self { node, port }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.port)
    }
}

/// Anything an acceptor can be asked to judge.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Entity {
    Node(Node),
    Endpoint(Endpoint),
}

impl Entity {
    pub fn address(&self) -> IpAddr {
        match self {
            Entity::Node(node) => node.address,
            Entity::Endpoint(endpoint) => endpoint.node.address,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entity::Node(node) => Some(node),
            Entity::Endpoint(_) => None,
        }
    }

    pub fn as_endpoint(&self) -> Option<&Endpoint> {
        match self {
            Entity::Endpoint(endpoint) => Some(endpoint),
            Entity::Node(_) => None,
        }
    }
}

impl From<Node> for Entity {
    fn from(node: Node) -> Self {
        Entity::Node(node)
    }
}

impl From<Endpoint> for Entity {
    fn from(endpoint: Endpoint) -> Self {
        Entity::Endpoint(endpoint)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Node(node) => node.fmt(f),
            Entity::Endpoint(endpoint) => endpoint.fmt(f),
        }
    }
}
