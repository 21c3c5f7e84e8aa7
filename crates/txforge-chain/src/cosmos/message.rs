//! Cosmos-like message model.
//!
//! A transaction carries an ordered list of [`CosmosMessage`]s. Each variant
//! holds only the fields of its amino message type; discriminators that are
//! not known to this crate are kept as [`CosmosMessage::Unsupported`].
//!
//! Messages render back to their amino JSON form with
//! [`CosmosMessage::to_amino_json`], which is also their `serde`
//! representation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use txforge_core::error::ParseError;

// ============================================================================
// Discriminators
// ============================================================================

/// Amino discriminators of the known message types.
pub mod msg_type {
    /// Transfer between two accounts.
    pub const SEND: &str = "cosmos-sdk/MsgSend";
    /// Delegation to a validator.
    pub const DELEGATE: &str = "cosmos-sdk/MsgDelegate";
    /// Undelegation from a validator.
    pub const UNDELEGATE: &str = "cosmos-sdk/MsgUndelegate";
    /// Move a delegation between validators.
    pub const BEGIN_REDELEGATE: &str = "cosmos-sdk/MsgBeginRedelegate";
    /// Governance proposal.
    pub const SUBMIT_PROPOSAL: &str = "cosmos-sdk/MsgSubmitProposal";
    /// Governance vote.
    pub const VOTE: &str = "cosmos-sdk/MsgVote";
    /// Governance deposit.
    pub const DEPOSIT: &str = "cosmos-sdk/MsgDeposit";
    /// Reward withdrawal (legacy name).
    pub const WITHDRAW_DELEGATION_REWARD: &str = "cosmos-sdk/MsgWithdrawDelegationReward";
    /// Many-to-many transfer.
    pub const MULTI_SEND: &str = "cosmos-sdk/MsgMultiSend";
    /// Validator creation.
    pub const CREATE_VALIDATOR: &str = "cosmos-sdk/MsgCreateValidator";
    /// Validator edition.
    pub const EDIT_VALIDATOR: &str = "cosmos-sdk/MsgEditValidator";
    /// Change of the reward withdrawal address.
    pub const SET_WITHDRAW_ADDRESS: &str = "cosmos-sdk/MsgModifyWithdrawAddress";
    /// Reward withdrawal.
    pub const WITHDRAW_DELEGATOR_REWARD: &str = "cosmos-sdk/MsgWithdrawDelegatorReward";
    /// Commission withdrawal.
    pub const WITHDRAW_VALIDATOR_COMMISSION: &str = "cosmos-sdk/MsgWithdrawValidatorCommission";
    /// Validator unjailing.
    pub const UNJAIL: &str = "cosmos-sdk/MsgUnjail";
}

/// JSON keys shared by the parsers and the amino renderer.
pub(crate) mod key {
    pub const ADDRESS: &str = "address";
    pub const AMOUNT: &str = "amount";
    pub const COINS: &str = "coins";
    pub const COMMISSION: &str = "commission";
    pub const COMMISSION_RATE: &str = "commission_rate";
    pub const CONTENT: &str = "content";
    pub const DELEGATOR_ADDRESS: &str = "delegator_address";
    pub const DENOM: &str = "denom";
    pub const DEPOSITOR: &str = "depositor";
    pub const DESCRIPTION: &str = "description";
    pub const DETAILS: &str = "details";
    pub const FROM_ADDRESS: &str = "from_address";
    pub const IDENTITY: &str = "identity";
    pub const INITIAL_DEPOSIT: &str = "initial_deposit";
    pub const INPUTS: &str = "inputs";
    pub const MAX_CHANGE_RATE: &str = "max_change_rate";
    pub const MAX_RATE: &str = "max_rate";
    pub const MIN_SELF_DELEGATION: &str = "min_self_delegation";
    pub const MONIKER: &str = "moniker";
    pub const OPTION: &str = "option";
    pub const OUTPUTS: &str = "outputs";
    pub const PROPOSAL_ID: &str = "proposal_id";
    pub const PROPOSER: &str = "proposer";
    pub const PUBKEY: &str = "pubkey";
    pub const RATE: &str = "rate";
    pub const TITLE: &str = "title";
    pub const TO_ADDRESS: &str = "to_address";
    pub const TYPE: &str = "type";
    pub const UPDATE_TIME: &str = "update_time";
    pub const VALIDATOR_ADDRESS: &str = "validator_address";
    pub const VALIDATOR_DST_ADDRESS: &str = "validator_dst_address";
    pub const VALIDATOR_SRC_ADDRESS: &str = "validator_src_address";
    pub const VALUE: &str = "value";
    pub const VOTER: &str = "voter";
    pub const WEBSITE: &str = "website";
    pub const WITHDRAW_ADDRESS: &str = "withdraw_address";
}

// ============================================================================
// Message fields
// ============================================================================

/// An amount in a given denomination. The amount stays a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Integer amount in `denom`.
    pub amount: String,
    /// Unit name, e.g. `uatom`.
    pub denom: String,
}

impl Coin {
    /// Create a coin.
    #[must_use]
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            denom: denom.into(),
        }
    }

    fn to_json(&self) -> Value {
        json!({ "amount": self.amount, "denom": self.denom })
    }
}

/// Governance vote option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteOption {
    /// In favour.
    Yes,
    /// Against.
    No,
    /// Against, with veto.
    NoWithVeto,
    /// Neutral.
    Abstain,
}

impl VoteOption {
    /// Amino spelling of the option.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
            Self::NoWithVeto => "NoWithVeto",
            Self::Abstain => "Abstain",
        }
    }
}

impl FromStr for VoteOption {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Self::Yes),
            "No" => Ok(Self::No),
            "NoWithVeto" => Ok(Self::NoWithVeto),
            "Abstain" => Ok(Self::Abstain),
            other => Err(ParseError::invalid_argument(format!(
                "unknown vote option {other:?}"
            ))),
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a governance proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalContent {
    /// Proposal type, e.g. `cosmos-sdk/TextProposal`.
    pub content_type: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
}

/// Public description of a validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorDescription {
    /// Display name.
    pub moniker: String,
    /// Optional identity signature (e.g. Keybase).
    pub identity: Option<String>,
    /// Optional website.
    pub website: Option<String>,
    /// Optional free-form details.
    pub details: Option<String>,
}

impl ValidatorDescription {
    fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(key::MONIKER.into(), self.moniker.clone().into());
        insert_optional(&mut object, key::IDENTITY, self.identity.as_ref());
        insert_optional(&mut object, key::WEBSITE, self.website.as_ref());
        insert_optional(&mut object, key::DETAILS, self.details.as_ref());
        Value::Object(object)
    }
}

/// Commission parameters of a validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatorCommission {
    /// Current rate.
    pub rate: String,
    /// Maximum rate.
    pub max_rate: String,
    /// Maximum daily change of the rate.
    pub max_change_rate: String,
    /// Last change of the rate.
    pub update_time: Option<DateTime<Utc>>,
}

impl ValidatorCommission {
    fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(key::RATE.into(), self.rate.clone().into());
        object.insert(key::MAX_RATE.into(), self.max_rate.clone().into());
        object.insert(
            key::MAX_CHANGE_RATE.into(),
            self.max_change_rate.clone().into(),
        );
        if let Some(update_time) = self.update_time {
            object.insert(
                key::UPDATE_TIME.into(),
                update_time
                    .to_rfc3339_opts(SecondsFormat::AutoSi, true)
                    .into(),
            );
        }
        Value::Object(object)
    }
}

/// One input of a multi-send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSendInput {
    /// Sending address.
    pub from_address: String,
    /// Coins taken from the address.
    pub coins: Vec<Coin>,
}

/// One output of a multi-send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiSendOutput {
    /// Receiving address.
    pub to_address: String,
    /// Coins credited to the address.
    pub coins: Vec<Coin>,
}

// ============================================================================
// CosmosMessage
// ============================================================================

/// A message of a Cosmos-like transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CosmosMessage {
    /// Transfer between two accounts.
    Send {
        /// Sender.
        from_address: String,
        /// Recipient.
        to_address: String,
        /// Transferred coins, in document order.
        amount: Vec<Coin>,
    },
    /// Delegation to a validator.
    Delegate {
        /// Delegator.
        delegator_address: String,
        /// Validator.
        validator_address: String,
        /// Delegated amount.
        amount: Coin,
    },
    /// Undelegation from a validator.
    Undelegate {
        /// Delegator.
        delegator_address: String,
        /// Validator.
        validator_address: String,
        /// Undelegated amount.
        amount: Coin,
    },
    /// Move a delegation from one validator to another.
    BeginRedelegate {
        /// Delegator.
        delegator_address: String,
        /// Validator the delegation leaves.
        validator_source_address: String,
        /// Validator the delegation joins.
        validator_destination_address: String,
        /// Redelegated amount.
        amount: Coin,
    },
    /// Governance proposal.
    SubmitProposal {
        /// Proposal content.
        content: ProposalContent,
        /// Proposer.
        proposer: String,
        /// Initial deposit.
        initial_deposit: Vec<Coin>,
    },
    /// Governance vote.
    Vote {
        /// Voter.
        voter: String,
        /// Proposal identifier.
        proposal_id: String,
        /// Chosen option.
        option: VoteOption,
    },
    /// Governance deposit.
    Deposit {
        /// Depositor.
        depositor: String,
        /// Proposal identifier.
        proposal_id: String,
        /// Deposited coins.
        amount: Vec<Coin>,
    },
    /// Reward withdrawal, legacy discriminator.
    WithdrawDelegationReward {
        /// Delegator.
        delegator_address: String,
        /// Validator.
        validator_address: String,
    },
    /// Many-to-many transfer.
    MultiSend {
        /// Inputs.
        inputs: Vec<MultiSendInput>,
        /// Outputs.
        outputs: Vec<MultiSendOutput>,
    },
    /// Validator creation.
    CreateValidator {
        /// Validator description, if given.
        description: Option<ValidatorDescription>,
        /// Commission parameters, if given.
        commission: Option<ValidatorCommission>,
        /// Minimum self delegation.
        min_self_delegation: String,
        /// Delegator (operator account).
        delegator_address: String,
        /// Validator operator address.
        validator_address: String,
        /// Consensus public key.
        pub_key: String,
        /// Self delegation, if given.
        value: Option<Coin>,
    },
    /// Validator edition.
    EditValidator {
        /// New description, if changed.
        description: Option<ValidatorDescription>,
        /// Validator operator address.
        validator_address: String,
        /// New commission rate, if changed.
        commission_rate: Option<String>,
        /// New minimum self delegation, if changed.
        min_self_delegation: Option<String>,
    },
    /// Change of the reward withdrawal address.
    SetWithdrawAddress {
        /// Delegator.
        delegator_address: String,
        /// New withdrawal address.
        withdraw_address: String,
    },
    /// Reward withdrawal.
    WithdrawDelegatorReward {
        /// Delegator.
        delegator_address: String,
        /// Validator.
        validator_address: String,
    },
    /// Commission withdrawal.
    WithdrawValidatorCommission {
        /// Validator operator address.
        validator_address: String,
    },
    /// Validator unjailing.
    Unjail {
        /// Validator operator address.
        validator_address: String,
    },
    /// A message type this crate does not model.
    Unsupported {
        /// The raw discriminator.
        msg_type: String,
    },
}

impl CosmosMessage {
    /// The amino discriminator of the message.
    #[must_use]
    pub fn msg_type(&self) -> &str {
        match self {
            Self::Send { .. } => msg_type::SEND,
            Self::Delegate { .. } => msg_type::DELEGATE,
            Self::Undelegate { .. } => msg_type::UNDELEGATE,
            Self::BeginRedelegate { .. } => msg_type::BEGIN_REDELEGATE,
            Self::SubmitProposal { .. } => msg_type::SUBMIT_PROPOSAL,
            Self::Vote { .. } => msg_type::VOTE,
            Self::Deposit { .. } => msg_type::DEPOSIT,
            Self::WithdrawDelegationReward { .. } => msg_type::WITHDRAW_DELEGATION_REWARD,
            Self::MultiSend { .. } => msg_type::MULTI_SEND,
            Self::CreateValidator { .. } => msg_type::CREATE_VALIDATOR,
            Self::EditValidator { .. } => msg_type::EDIT_VALIDATOR,
            Self::SetWithdrawAddress { .. } => msg_type::SET_WITHDRAW_ADDRESS,
            Self::WithdrawDelegatorReward { .. } => msg_type::WITHDRAW_DELEGATOR_REWARD,
            Self::WithdrawValidatorCommission { .. } => msg_type::WITHDRAW_VALIDATOR_COMMISSION,
            Self::Unjail { .. } => msg_type::UNJAIL,
            Self::Unsupported { msg_type } => msg_type,
        }
    }

    /// Whether the message type is modelled by this crate.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }

    /// The message as an amino `{"type": .., "value": {..}}` object.
    ///
    /// An [`Unsupported`](Self::Unsupported) message renders with an empty
    /// value since its fields were not kept.
    #[must_use]
    pub fn to_amino_json(&self) -> Value {
        json!({ "type": self.msg_type(), "value": self.value_json() })
    }

    fn value_json(&self) -> Value {
        match self {
            Self::Send {
                from_address,
                to_address,
                amount,
            } => json!({
                "from_address": from_address,
                "to_address": to_address,
                "amount": coins_json(amount),
            }),
            Self::Delegate {
                delegator_address,
                validator_address,
                amount,
            }
            | Self::Undelegate {
                delegator_address,
                validator_address,
                amount,
            } => json!({
                "delegator_address": delegator_address,
                "validator_address": validator_address,
                "amount": amount.to_json(),
            }),
            Self::BeginRedelegate {
                delegator_address,
                validator_source_address,
                validator_destination_address,
                amount,
            } => json!({
                "delegator_address": delegator_address,
                "validator_src_address": validator_source_address,
                "validator_dst_address": validator_destination_address,
                "amount": amount.to_json(),
            }),
            Self::SubmitProposal {
                content,
                proposer,
                initial_deposit,
            } => json!({
                "content": {
                    "type": content.content_type,
                    "title": content.title,
                    "description": content.description,
                },
                "proposer": proposer,
                "initial_deposit": coins_json(initial_deposit),
            }),
            Self::Vote {
                voter,
                proposal_id,
                option,
            } => json!({
                "voter": voter,
                "proposal_id": proposal_id,
                "option": option.as_str(),
            }),
            Self::Deposit {
                depositor,
                proposal_id,
                amount,
            } => json!({
                "depositor": depositor,
                "proposal_id": proposal_id,
                "amount": coins_json(amount),
            }),
            Self::WithdrawDelegationReward {
                delegator_address,
                validator_address,
            }
            | Self::WithdrawDelegatorReward {
                delegator_address,
                validator_address,
            } => json!({
                "delegator_address": delegator_address,
                "validator_address": validator_address,
            }),
            Self::MultiSend { inputs, outputs } => json!({
                "inputs": inputs
                    .iter()
                    .map(|input| json!({
                        "address": input.from_address,
                        "coins": coins_json(&input.coins),
                    }))
                    .collect::<Vec<_>>(),
                "outputs": outputs
                    .iter()
                    .map(|output| json!({
                        "address": output.to_address,
                        "coins": coins_json(&output.coins),
                    }))
                    .collect::<Vec<_>>(),
            }),
            Self::CreateValidator {
                description,
                commission,
                min_self_delegation,
                delegator_address,
                validator_address,
                pub_key,
                value,
            } => {
                let mut object = Map::new();
                if let Some(description) = description {
                    object.insert(key::DESCRIPTION.into(), description.to_json());
                }
                if let Some(commission) = commission {
                    object.insert(key::COMMISSION.into(), commission.to_json());
                }
                object.insert(
                    key::MIN_SELF_DELEGATION.into(),
                    min_self_delegation.clone().into(),
                );
                object.insert(
                    key::DELEGATOR_ADDRESS.into(),
                    delegator_address.clone().into(),
                );
                object.insert(
                    key::VALIDATOR_ADDRESS.into(),
                    validator_address.clone().into(),
                );
                object.insert(key::PUBKEY.into(), pub_key.clone().into());
                if let Some(value) = value {
                    object.insert(key::VALUE.into(), value.to_json());
                }
                Value::Object(object)
            }
            Self::EditValidator {
                description,
                validator_address,
                commission_rate,
                min_self_delegation,
            } => {
                let mut object = Map::new();
                if let Some(description) = description {
                    object.insert(key::DESCRIPTION.into(), description.to_json());
                }
                object.insert(
                    key::VALIDATOR_ADDRESS.into(),
                    validator_address.clone().into(),
                );
                insert_optional(&mut object, key::COMMISSION_RATE, commission_rate.as_ref());
                insert_optional(
                    &mut object,
                    key::MIN_SELF_DELEGATION,
                    min_self_delegation.as_ref(),
                );
                Value::Object(object)
            }
            Self::SetWithdrawAddress {
                delegator_address,
                withdraw_address,
            } => json!({
                "delegator_address": delegator_address,
                "withdraw_address": withdraw_address,
            }),
            Self::WithdrawValidatorCommission { validator_address }
            | Self::Unjail { validator_address } => json!({
                "validator_address": validator_address,
            }),
            Self::Unsupported { .. } => Value::Object(Map::new()),
        }
    }
}

impl Serialize for CosmosMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_amino_json().serialize(serializer)
    }
}

pub(crate) fn coins_json(coins: &[Coin]) -> Value {
    Value::Array(coins.iter().map(Coin::to_json).collect())
}

fn insert_optional(object: &mut Map<String, Value>, name: &str, value: Option<&String>) {
    if let Some(value) = value {
        object.insert(name.to_string(), Value::String(value.clone()));
    }
}
