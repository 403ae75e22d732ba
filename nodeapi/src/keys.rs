use dependencies::secp256k1::PublicKey;

// KeyFamily represents a "family" of keys inside the node's HD key chain.
// Families are distinct branches of the backing wallet, so every key ever
// handed out can be re-derived from the family and index alone. The
// balanced open protocol leans on this: multisig keys live in one fixed
// family, transit keys in another, and recovery re-derives transit keys by
// scanning indices within the family.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct KeyFamily(pub u32);

// KeyLocator is a two-tuple sufficient to derive any key the node has ever
// used for this protocol: m/.../family/0/index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct KeyLocator {
    // family is the family of key being identified.
    pub family: KeyFamily,

    // index is the precise index of the key being identified.
    pub index: u32,
}

// KeyDescriptor pairs a locator with the public key it derives to. Both
// sides are always known here: the locator is what the signer consumes,
// the public key is what ends up in scripts and records.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyDescriptor {
    pub locator: KeyLocator,
    pub public_key: PublicKey,
}

impl KeyLocator {
    pub fn new(family: u32, index: u32) -> Self {
        KeyLocator {
            family: KeyFamily(family),
            index: index,
        }
    }
}
