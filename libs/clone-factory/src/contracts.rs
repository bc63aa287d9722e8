use alloy::sol;

sol! {
    /// Platform account bundle every strategy initializer takes.
    #[derive(Debug, PartialEq, Eq)]
    struct CommonAddresses {
        address vault;
        address router;
        address keeper;
        address strategist;
        address feeRecipient;
        address feeConfig;
    }

    /// Solidly router hop.
    #[derive(Debug, PartialEq, Eq)]
    struct SwapHop {
        address tokenIn;
        address tokenOut;
        bool stable;
    }

    /// Balancer batch-swap leg, indexes point into the bundled asset list.
    #[derive(Debug, PartialEq, Eq)]
    struct BatchSwapStep {
        bytes32 poolId;
        uint256 assetInIndex;
        uint256 assetOutIndex;
    }

    #[sol(rpc)]
    contract VaultFactory {
        event ProxyCreated(address proxy);

        function cloneVault() external returns (address);
        function cloneContract(address implementation) external returns (address);
    }

    #[sol(rpc)]
    contract Vault {
        function initialize(
            address strategy,
            string memory name,
            string memory symbol,
            uint256 approvalDelay
        ) external;

        function transferOwnership(address newOwner) external;

        function owner() external view returns (address);
    }

    #[sol(rpc)]
    contract SolidlyGaugeStrategy {
        function initialize(
            address want,
            address gauge,
            CommonAddresses memory commonAddresses,
            SwapHop[] memory outputToNativeRoute,
            SwapHop[] memory outputToLp0Route,
            SwapHop[] memory outputToLp1Route
        ) external;
    }

    #[sol(rpc)]
    contract StakedGaugeStrategy {
        function initialize(
            address want,
            address gauge,
            address gaugeStaker,
            CommonAddresses memory commonAddresses,
            SwapHop[] memory outputToNativeRoute,
            SwapHop[] memory outputToLp0Route,
            SwapHop[] memory outputToLp1Route
        ) external;
    }

    #[sol(rpc)]
    contract BalancerChefStrategy {
        function initialize(
            address want,
            bool[2] memory flags,
            BatchSwapStep[] memory nativeToInputRoute,
            BatchSwapStep[] memory outputToNativeRoute,
            address[][] memory assets,
            address chef,
            uint256 poolId,
            CommonAddresses memory commonAddresses
        ) external;
    }

    #[sol(rpc)]
    contract ComposableChefStrategy {
        function initialize(
            bool[2] memory flags,
            BatchSwapStep[] memory nativeToInputRoute,
            BatchSwapStep[] memory outputToNativeRoute,
            address[][] memory assets,
            address chef,
            uint256 poolId,
            CommonAddresses memory commonAddresses
        ) external;
    }

    #[sol(rpc)]
    interface IStrategyRewards {
        function addRewardToken(
            address token,
            BatchSwapStep[] memory route,
            address[] memory assets,
            bytes memory routeToNative,
            uint256 slippageBp
        ) external;
    }
}
