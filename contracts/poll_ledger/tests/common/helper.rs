#![allow(dead_code)]

use anyhow::Result as AnyResult;
use cosmwasm_std::{coins, Addr, Coin, Empty, StdResult};
use cw_multi_test::{App, AppResponse, BasicAppBuilder, Contract, ContractWrapper, Executor};

use poll_governance::poll_ledger::{
    Config, ExecuteMsg, InstantiateMsg, MigrateMsg, Poll, PollStatusResponse, QueryMsg,
    VoterReceipt,
};
use poll_governance::tally::PollStats;

pub const DAY: u64 = 86400;
pub const DENOM: &str = "uvote";

fn poll_ledger_contract() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new_with_empty(
            poll_ledger::execute::execute,
            poll_ledger::instantiate::instantiate,
            poll_ledger::query::query,
        )
        .with_migrate(poll_ledger::migration::migrate),
    )
}

pub struct Helper {
    pub app: App,
    pub owner: Addr,
    pub poll_ledger: Addr,
    pub code_id: u64,
}

impl Helper {
    pub fn new(owner: &Addr) -> AnyResult<Self> {
        let mut app = BasicAppBuilder::new().build(|router, _, storage| {
            router
                .bank
                .init_balance(storage, owner, coins(1_000_000, DENOM))
                .unwrap()
        });

        let code_id = app.store_code(poll_ledger_contract());
        let poll_ledger = app.instantiate_contract(
            code_id,
            owner.clone(),
            &InstantiateMsg {
                owner: owner.to_string(),
                max_poll_duration: 7 * DAY,
            },
            &[],
            "Poll ledger",
            Some(owner.to_string()),
        )?;

        Ok(Self {
            app,
            owner: owner.clone(),
            poll_ledger,
            code_id,
        })
    }

    pub fn timetravel(&mut self, time: u64) {
        self.app.update_block(|block| {
            block.time = block.time.plus_seconds(time);
        })
    }

    pub fn block_time(&self) -> u64 {
        self.app.block_info().time.seconds()
    }

    pub fn create_poll(
        &mut self,
        sender: &Addr,
        title: &str,
        options: &[&str],
        duration_seconds: u64,
    ) -> AnyResult<AppResponse> {
        self.create_poll_with_funds(sender, title, options, duration_seconds, &[])
    }

    pub fn create_poll_with_funds(
        &mut self,
        sender: &Addr,
        title: &str,
        options: &[&str],
        duration_seconds: u64,
        funds: &[Coin],
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.poll_ledger.clone(),
            &ExecuteMsg::CreatePoll {
                title: title.to_string(),
                description: format!("{title} description"),
                options: options.iter().map(|o| o.to_string()).collect(),
                duration_seconds,
            },
            funds,
        )
    }

    pub fn cast_vote(
        &mut self,
        sender: &Addr,
        poll: &str,
        option_index: u32,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.poll_ledger.clone(),
            &ExecuteMsg::CastVote {
                poll: poll.to_string(),
                option_index,
            },
            &[],
        )
    }

    pub fn close_poll(&mut self, sender: &Addr, poll: &str) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.poll_ledger.clone(),
            &ExecuteMsg::ClosePoll {
                poll: poll.to_string(),
            },
            &[],
        )
    }

    pub fn update_config(
        &mut self,
        sender: &Addr,
        owner: Option<String>,
        max_poll_duration: Option<u64>,
    ) -> AnyResult<AppResponse> {
        self.app.execute_contract(
            sender.clone(),
            self.poll_ledger.clone(),
            &ExecuteMsg::UpdateConfig {
                owner,
                max_poll_duration,
            },
            &[],
        )
    }

    pub fn migrate(&mut self) -> AnyResult<AppResponse> {
        self.app.migrate_contract(
            self.owner.clone(),
            self.poll_ledger.clone(),
            &MigrateMsg {},
            self.code_id,
        )
    }

    pub fn query_config(&self) -> StdResult<Config> {
        self.app
            .wrap()
            .query_wasm_smart(&self.poll_ledger, &QueryMsg::Config {})
    }

    pub fn query_poll(&self, address: &str) -> StdResult<Poll> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::Poll {
                address: address.to_string(),
            },
        )
    }

    pub fn query_poll_by_title(&self, authority: &Addr, title: &str) -> StdResult<Poll> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::PollByTitle {
                authority: authority.to_string(),
                title: title.to_string(),
            },
        )
    }

    pub fn query_polls(
        &self,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<Vec<Poll>> {
        self.app
            .wrap()
            .query_wasm_smart(&self.poll_ledger, &QueryMsg::Polls { start_after, limit })
    }

    pub fn query_polls_by_authority(
        &self,
        authority: &Addr,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<Vec<Poll>> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::PollsByAuthority {
                authority: authority.to_string(),
                start_after,
                limit,
            },
        )
    }

    pub fn query_status(&self, address: &str) -> StdResult<PollStatusResponse> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::PollStatus {
                address: address.to_string(),
            },
        )
    }

    pub fn query_stats(&self, address: &str) -> StdResult<PollStats> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::Stats {
                address: address.to_string(),
            },
        )
    }

    pub fn query_receipt(&self, poll: &str, voter: &Addr) -> StdResult<Option<VoterReceipt>> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::Receipt {
                poll: poll.to_string(),
                voter: voter.to_string(),
            },
        )
    }

    pub fn query_receipt_by_address(&self, address: &str) -> StdResult<VoterReceipt> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::ReceiptByAddress {
                address: address.to_string(),
            },
        )
    }

    pub fn query_receipts_by_voter(
        &self,
        voter: &Addr,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<Vec<VoterReceipt>> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::ReceiptsByVoter {
                voter: voter.to_string(),
                start_after,
                limit,
            },
        )
    }

    pub fn query_poll_voters(
        &self,
        poll: &str,
        start_after: Option<String>,
        limit: Option<u32>,
    ) -> StdResult<Vec<VoterReceipt>> {
        self.app.wrap().query_wasm_smart(
            &self.poll_ledger,
            &QueryMsg::PollVoters {
                poll: poll.to_string(),
                start_after,
                limit,
            },
        )
    }
}

/// Reads the poll address the contract put into the response data.
pub fn poll_address(response: &AppResponse) -> String {
    let data = response.data.clone().expect("create_poll sets response data");
    cosmwasm_std::from_json(data).unwrap()
}
