//! Amino JSON message parsers.
//!
//! Every message of a Cosmos-like transaction is a `{"type": .., "value": {..}}`
//! object. [`parse_message`] looks the discriminator up in a static dispatch
//! table and runs the matching parser on the `value` object. Discriminators
//! missing from the table become [`CosmosMessage::Unsupported`].
//!
//! Required fields go through [`get_string`]; optional ones are read only
//! when present and of the right type.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use txforge_core::error::ParseError;

use super::message::{
    key, msg_type, Coin, CosmosMessage, MultiSendInput, MultiSendOutput, ProposalContent,
    ValidatorCommission, ValidatorDescription, VoteOption,
};

/// A JSON object, as produced by `serde_json`.
pub type JsonObject = Map<String, Value>;

/// Parser of one message type, given the message `value` object.
pub type MessageParser = fn(&JsonObject) -> Result<CosmosMessage, ParseError>;

/// Discriminator to parser table.
const PARSERS: &[(&str, MessageParser)] = &[
    (msg_type::SEND, parse_send),
    (msg_type::DELEGATE, parse_delegate),
    (msg_type::UNDELEGATE, parse_undelegate),
    (msg_type::BEGIN_REDELEGATE, parse_begin_redelegate),
    (msg_type::SUBMIT_PROPOSAL, parse_submit_proposal),
    (msg_type::VOTE, parse_vote),
    (msg_type::DEPOSIT, parse_deposit),
    (
        msg_type::WITHDRAW_DELEGATION_REWARD,
        parse_withdraw_delegation_reward,
    ),
    (msg_type::MULTI_SEND, parse_multi_send),
    (msg_type::CREATE_VALIDATOR, parse_create_validator),
    (msg_type::EDIT_VALIDATOR, parse_edit_validator),
    (msg_type::SET_WITHDRAW_ADDRESS, parse_set_withdraw_address),
    (
        msg_type::WITHDRAW_DELEGATOR_REWARD,
        parse_withdraw_delegator_reward,
    ),
    (
        msg_type::WITHDRAW_VALIDATOR_COMMISSION,
        parse_withdraw_validator_commission,
    ),
    (msg_type::UNJAIL, parse_unjail),
];

/// Discriminators with a dedicated parser.
pub fn known_message_types() -> impl Iterator<Item = &'static str> {
    PARSERS.iter().map(|(name, _)| *name)
}

/// The parser registered for `discriminator`, if any.
#[must_use]
pub fn message_parser(discriminator: &str) -> Option<MessageParser> {
    PARSERS
        .iter()
        .find(|(name, _)| *name == discriminator)
        .map(|(_, parser)| *parser)
}

/// Parse one `{"type": .., "value": {..}}` message.
///
/// # Errors
///
/// Returns [`ParseError::InvalidArgument`] when `message` is not an object,
/// when `type` is missing, when a known message has a non-object `value`, or
/// when a required field of a known message is missing. An unknown
/// discriminator is not an error.
pub fn parse_message(message: &Value) -> Result<CosmosMessage, ParseError> {
    let object = message
        .as_object()
        .ok_or_else(|| ParseError::invalid_argument("message must be a JSON object"))?;
    let discriminator = get_string(object, key::TYPE)?;

    let Some(parser) = message_parser(&discriminator) else {
        tracing::warn!(msg_type = %discriminator, "unsupported cosmos message type");
        return Ok(CosmosMessage::Unsupported {
            msg_type: discriminator,
        });
    };

    let value = get_object(object, key::VALUE)?;
    parser(value)
}

// ============================================================================
// Field helpers
// ============================================================================

/// Read a required string field.
///
/// # Errors
///
/// Returns [`ParseError::InvalidArgument`] naming `field` when the key is
/// absent or its value is not a string.
pub fn get_string(object: &JsonObject, field: &str) -> Result<String, ParseError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ParseError::invalid_argument(format!("{field} must be a string")))
}

/// Read a string field that may be absent. A value of another type counts as
/// absent.
#[must_use]
pub fn get_optional_string(object: &JsonObject, field: &str) -> Option<String> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn get_object<'a>(object: &'a JsonObject, field: &str) -> Result<&'a JsonObject, ParseError> {
    object
        .get(field)
        .and_then(Value::as_object)
        .ok_or_else(|| ParseError::invalid_argument(format!("{field} must be an object")))
}

fn get_optional_object<'a>(object: &'a JsonObject, field: &str) -> Option<&'a JsonObject> {
    object.get(field).and_then(Value::as_object)
}

/// Read a `{amount, denom}` object.
///
/// # Errors
///
/// Returns [`ParseError::InvalidArgument`] when either key is missing.
pub fn parse_coin(object: &JsonObject) -> Result<Coin, ParseError> {
    Ok(Coin {
        amount: get_string(object, key::AMOUNT)?,
        denom: get_string(object, key::DENOM)?,
    })
}

/// Normalize a coin list that may be a single object or an array.
///
/// Non-object array elements are skipped; any other shape yields an empty
/// list.
fn parse_coins(value: Option<&Value>) -> Result<Vec<Coin>, ParseError> {
    match value {
        Some(Value::Object(coin)) => Ok(vec![parse_coin(coin)?]),
        Some(Value::Array(coins)) => parse_coin_array(coins),
        _ => Ok(Vec::new()),
    }
}

fn parse_coin_array(coins: &[Value]) -> Result<Vec<Coin>, ParseError> {
    let mut parsed = Vec::with_capacity(coins.len());
    for coin in coins {
        match coin.as_object() {
            Some(object) => parsed.push(parse_coin(object)?),
            None => tracing::warn!("skipping non-object coin entry"),
        }
    }
    Ok(parsed)
}

fn parse_description(object: &JsonObject) -> Result<ValidatorDescription, ParseError> {
    Ok(ValidatorDescription {
        moniker: get_string(object, key::MONIKER)?,
        identity: get_optional_string(object, key::IDENTITY),
        website: get_optional_string(object, key::WEBSITE),
        details: get_optional_string(object, key::DETAILS),
    })
}

fn parse_commission(object: &JsonObject) -> Result<ValidatorCommission, ParseError> {
    let update_time = get_optional_string(object, key::UPDATE_TIME)
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|time| time.with_timezone(&Utc))
                .map_err(|e| {
                    ParseError::invalid_argument(format!("update_time {raw:?} is not RFC 3339: {e}"))
                })
        })
        .transpose()?;

    Ok(ValidatorCommission {
        rate: get_string(object, key::RATE)?,
        max_rate: get_string(object, key::MAX_RATE)?,
        max_change_rate: get_string(object, key::MAX_CHANGE_RATE)?,
        update_time,
    })
}

// ============================================================================
// Message parsers
// ============================================================================

fn parse_send(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::Send {
        from_address: get_string(value, key::FROM_ADDRESS)?,
        to_address: get_string(value, key::TO_ADDRESS)?,
        amount: parse_coins(value.get(key::AMOUNT))?,
    })
}

fn parse_delegate(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::Delegate {
        delegator_address: get_string(value, key::DELEGATOR_ADDRESS)?,
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
        amount: parse_coin(get_object(value, key::AMOUNT)?)?,
    })
}

fn parse_undelegate(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::Undelegate {
        delegator_address: get_string(value, key::DELEGATOR_ADDRESS)?,
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
        amount: parse_coin(get_object(value, key::AMOUNT)?)?,
    })
}

fn parse_begin_redelegate(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::BeginRedelegate {
        delegator_address: get_string(value, key::DELEGATOR_ADDRESS)?,
        validator_source_address: get_string(value, key::VALIDATOR_SRC_ADDRESS)?,
        validator_destination_address: get_string(value, key::VALIDATOR_DST_ADDRESS)?,
        amount: parse_coin(get_object(value, key::AMOUNT)?)?,
    })
}

fn parse_submit_proposal(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    let content = get_object(value, key::CONTENT)?;
    let initial_deposit = match value.get(key::INITIAL_DEPOSIT) {
        Some(Value::Array(coins)) => parse_coin_array(coins)?,
        _ => {
            return Err(ParseError::invalid_argument(
                "initial_deposit must be an array",
            ))
        }
    };

    Ok(CosmosMessage::SubmitProposal {
        content: ProposalContent {
            content_type: get_string(content, key::TYPE)?,
            title: get_string(content, key::TITLE)?,
            description: get_string(content, key::DESCRIPTION)?,
        },
        proposer: get_string(value, key::PROPOSER)?,
        initial_deposit,
    })
}

fn parse_vote(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::Vote {
        voter: get_string(value, key::VOTER)?,
        proposal_id: get_string(value, key::PROPOSAL_ID)?,
        option: get_string(value, key::OPTION)?.parse::<VoteOption>()?,
    })
}

fn parse_deposit(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::Deposit {
        depositor: get_string(value, key::DEPOSITOR)?,
        proposal_id: get_string(value, key::PROPOSAL_ID)?,
        amount: parse_coins(value.get(key::AMOUNT))?,
    })
}

fn parse_withdraw_delegation_reward(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::WithdrawDelegationReward {
        delegator_address: get_string(value, key::DELEGATOR_ADDRESS)?,
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
    })
}

fn parse_multi_send(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    let inputs = multi_send_entries(value, key::INPUTS)?
        .into_iter()
        .map(|(from_address, coins)| MultiSendInput {
            from_address,
            coins,
        })
        .collect();
    let outputs = multi_send_entries(value, key::OUTPUTS)?
        .into_iter()
        .map(|(to_address, coins)| MultiSendOutput { to_address, coins })
        .collect();

    Ok(CosmosMessage::MultiSend { inputs, outputs })
}

/// `(address, coins)` pairs of a multi-send side. A missing or non-array
/// side is empty.
fn multi_send_entries(
    value: &JsonObject,
    side: &str,
) -> Result<Vec<(String, Vec<Coin>)>, ParseError> {
    let Some(entries) = value.get(side).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut parsed = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(entry) = entry.as_object() else {
            tracing::warn!(side, "skipping non-object multi-send entry");
            continue;
        };
        parsed.push((
            get_string(entry, key::ADDRESS)?,
            parse_coins(entry.get(key::COINS))?,
        ));
    }
    Ok(parsed)
}

fn parse_create_validator(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    let description = get_optional_object(value, key::DESCRIPTION)
        .map(parse_description)
        .transpose()?;
    let commission = get_optional_object(value, key::COMMISSION)
        .map(parse_commission)
        .transpose()?;
    let self_delegation = get_optional_object(value, key::VALUE)
        .map(parse_coin)
        .transpose()?;

    Ok(CosmosMessage::CreateValidator {
        description,
        commission,
        min_self_delegation: get_string(value, key::MIN_SELF_DELEGATION)?,
        delegator_address: get_string(value, key::DELEGATOR_ADDRESS)?,
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
        pub_key: get_string(value, key::PUBKEY)?,
        value: self_delegation,
    })
}

fn parse_edit_validator(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    let description = get_optional_object(value, key::DESCRIPTION)
        .map(parse_description)
        .transpose()?;

    Ok(CosmosMessage::EditValidator {
        description,
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
        commission_rate: get_optional_string(value, key::COMMISSION_RATE),
        min_self_delegation: get_optional_string(value, key::MIN_SELF_DELEGATION),
    })
}

fn parse_set_withdraw_address(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::SetWithdrawAddress {
        delegator_address: get_string(value, key::DELEGATOR_ADDRESS)?,
        withdraw_address: get_string(value, key::WITHDRAW_ADDRESS)?,
    })
}

fn parse_withdraw_delegator_reward(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::WithdrawDelegatorReward {
        delegator_address: get_string(value, key::DELEGATOR_ADDRESS)?,
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
    })
}

fn parse_withdraw_validator_commission(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::WithdrawValidatorCommission {
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
    })
}

fn parse_unjail(value: &JsonObject) -> Result<CosmosMessage, ParseError> {
    Ok(CosmosMessage::Unjail {
        validator_address: get_string(value, key::VALIDATOR_ADDRESS)?,
    })
}

// ============================================================================
// Tests
// ============================================================================
