//! Solidity interfaces the client calls.

use alloy_sol_types::sol;

sol! {
    /// Token streaming contract.
    interface ISablier {
        function createStream(
            address recipient,
            uint256 deposit,
            address token_address,
            uint256 start_time,
            uint256 stop_time
        ) external returns (uint256 stream_id);

        function cancel(uint256 stream_id) external returns (bool);

        function withdraw(uint256 stream_id) external returns (bool);
    }

    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}
