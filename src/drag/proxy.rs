use crate::{
    config::DragConfig,
    domain::{Card, CardId},
    layout::{Point, Rect},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyId(Uuid);

impl ProxyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProxyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-interactive clone of a card that follows the pointer during a drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proxy {
    pub id: ProxyId,
    pub card: CardId,
    pub label: String,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub z_index: i32,
    pub interactive: bool,
}

impl Proxy {
    /// Clones a card's appearance at its current box
    pub fn of(card: &Card, rect: Rect, position: Point, config: &DragConfig) -> Self {
        Self {
            id: ProxyId::new(),
            card: card.id.clone(),
            label: card.label.clone(),
            position,
            width: rect.width,
            height: rect.height,
            opacity: config.proxy_opacity,
            z_index: config.proxy_z_index,
            interactive: false,
        }
    }
}

/// Elements appended to the document root, above the board
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    proxies: Vec<Proxy>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, proxy: Proxy) -> ProxyId {
        let id = proxy.id;
        self.proxies.push(proxy);
        id
    }

    pub fn get(&self, id: ProxyId) -> Option<&Proxy> {
        self.proxies.iter().find(|p| p.id == id)
    }

    pub fn move_to(&mut self, id: ProxyId, position: Point) -> bool {
        match self.proxies.iter_mut().find(|p| p.id == id) {
            Some(proxy) => {
                proxy.position = position;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ProxyId) -> Option<Proxy> {
        let index = self.proxies.iter().position(|p| p.id == id)?;
        Some(self.proxies.remove(index))
    }

    pub fn proxies(&self) -> &[Proxy] {
        &self.proxies
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
